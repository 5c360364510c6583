// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed catalog of pseudonyms handed out to room members.
//!
//! Each entry pairs a base name with an emoji. The user-visible display form
//! is `"{emoji} {name}"`. The catalog is built once at startup and is
//! read-only afterwards.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// One pseudonym in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub emoji: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self { name: name.into(), emoji: emoji.into() }
    }

    /// User-visible form: emoji, a space, then the base name.
    pub fn display(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

/// Immutable, de-duplicated list of catalog entries.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from arbitrary entries, dropping repeated display forms.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries.into_iter().filter(|e| seen.insert(e.display())).collect();
        Self { entries }
    }

    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().map(|(name, emoji)| CatalogEntry::new(*name, *emoji)))
    }

    /// Load a catalog from a JSON array of `{"name": ..., "emoji": ...}` objects.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading names file {}", path.display()))?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&contents)
            .with_context(|| format!("parsing names file {}", path.display()))?;
        let catalog = Self::from_entries(entries);
        if catalog.is_empty() {
            anyhow::bail!("names file {} contains no entries", path.display());
        }
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `name` is some entry's display form or base name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name || e.display() == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN: &[(&str, &str)] = &[
    // Animals
    ("Mysterious Wolf", "🐺"),
    ("Shadow Cat", "🐱"),
    ("Night Eagle", "🦅"),
    ("Cunning Fox", "🦊"),
    ("Silent Bear", "🐻"),
    ("Phantom Tiger", "🐅"),
    ("Hidden Lion", "🦁"),
    ("Secret Puma", "🐾"),
    ("Black Hawk", "🪶"),
    ("Wise Serpent", "🐍"),
    ("Swift Deer", "🦌"),
    ("Wise Owl", "🦉"),
    ("Pink Panther", "🐆"),
    ("Blue Dolphin", "🐬"),
    ("Golden Cobra", "🪙"),
    ("Silver Jaguar", "🐯"),
    ("Green Frog", "🐸"),
    ("Patient Turtle", "🐢"),
    ("Quick Rabbit", "🐰"),
    ("Grey Elephant", "🐘"),
    ("Chilly Penguin", "🐧"),
    ("Sleepy Koala", "🐨"),
    ("Mischievous Monkey", "🐵"),
    ("Round Hippo", "🦛"),
    ("Mighty Rhino", "🦏"),
    ("Tall Giraffe", "🦒"),
    ("Striped Zebra", "🦓"),
    ("Midnight Bat", "🦇"),
    // Colors and weather
    ("Violet Mist", "🌫️"),
    ("Emerald Flame", "🔥"),
    ("Crimson Frost", "❄️"),
    ("Golden Bolt", "⚡"),
    ("Silver Breeze", "🌬️"),
    ("Blue Storm", "⛈️"),
    ("Red Dawn", "🌅"),
    ("Grey Fog", "🌁"),
    ("Green Crystal", "💎"),
    ("Black Wind", "💨"),
    ("White Moon", "🌙"),
    ("Orange Sun", "☀️"),
    ("Purple Star", "⭐"),
    ("Turquoise Sea", "🌊"),
    ("Pink Sky", "🌸"),
    ("Brown Earth", "🌍"),
    ("Soft Cloud", "☁️"),
    ("Hard Rock", "🪨"),
    ("Lovely Flower", "🌺"),
    ("Fresh Rain", "🌧️"),
    ("White Snowfall", "🌨️"),
    ("Bright Rainbow", "🌈"),
    ("Shining Comet", "☄️"),
    ("Endless Galaxy", "🌌"),
    // Mystical
    ("Anonymous Wizard", "🧙"),
    ("Silent Ninja", "🥷"),
    ("Friendly Ghost", "👻"),
    ("Free Spirit", "🕊️"),
    ("Wandering Soul", "👤"),
    ("Dancing Shadow", "💃"),
    ("Lost Echo", "📢"),
    ("Night Whisper", "🌃"),
    ("Secret Guardian", "🛡️"),
    ("Hidden Traveler", "🎒"),
    ("Wise Hermit", "🏔️"),
    ("Digital Nomad", "💻"),
    ("Invisible Poet", "📝"),
    ("Eternal Dreamer", "💭"),
    ("Deep Thinker", "🤔"),
    ("Quiet Observer", "👁️"),
    ("Mute Sorcerer", "🪄"),
    ("Green Witch", "🧹"),
    ("Lost Elf", "🧝"),
    ("Playful Sprite", "🧚"),
    ("Nocturnal Vampire", "🧛"),
    ("Friendly Zombie", "🧟"),
    ("Clever Robot", "🤖"),
    ("Curious Alien", "👽"),
    // Elements
    ("Dancing Fire", "🎇"),
    ("Crystal Water", "💧"),
    ("Pure Air", "🍃"),
    ("Solid Ground", "🧱"),
    ("Bright Lightning", "🌩️"),
    ("Distant Thunder", "🥁"),
    ("Gentle Drizzle", "☔"),
    ("White Snow", "⛄"),
    ("Sleeping Volcano", "🌋"),
    ("Serene River", "🏞️"),
    ("High Mountain", "⛰️"),
    ("Deep Valley", "🏕️"),
    ("Hot Lava", "🌶️"),
    ("Cold Ice", "🧊"),
    ("Golden Sand", "🏖️"),
    ("Green Forest", "🌲"),
    ("Dry Desert", "🏜️"),
    ("Calm Beach", "🏝️"),
    ("Dark Cave", "🕳️"),
    // Abstract
    ("Living Enigma", "❓"),
    ("Walking Mystery", "🔍"),
    ("Whispering Secret", "🤫"),
    ("Cheerful Unknown", "❔"),
    ("Smiling Paradox", "🤹"),
    ("Dancing Dilemma", "🤷"),
    ("Friendly Riddle", "🧩"),
    ("Mind Maze", "🌀"),
    ("Ciphered Code", "🔐"),
    ("Lost Signal", "📡"),
    ("Hidden Message", "💌"),
    ("Bright Idea", "💡"),
    ("Deep Sleep", "😴"),
    ("Lost Memory", "🧠"),
    ("Endless Time", "⏳"),
    ("Infinite Space", "🪐"),
    ("Total Silence", "🤐"),
    ("Ordered Chaos", "🌪️"),
    ("Inner Peace", "☮️"),
    // Professions
    ("Night Artist", "🎨"),
    ("Phantom Musician", "🎵"),
    ("Shadow Writer", "✍️"),
    ("Invisible Painter", "🖌️"),
    ("Secret Chef", "🍳"),
    ("Hidden Gardener", "🌱"),
    ("Mysterious Architect", "🏗️"),
    ("Ghost Pilot", "✈️"),
    ("Anonymous Captain", "⚓"),
    ("Invisible Doctor", "⚕️"),
    ("Secret Professor", "📚"),
    ("Hidden Inventor", "🔬"),
    ("Brave Firefighter", "🚒"),
    ("Lost Astronaut", "🧑‍🚀"),
    ("Mad Scientist", "🥽"),
    ("Ninja Programmer", "🧑‍💻"),
    ("Creative Designer", "🎭"),
    ("Hidden Photographer", "📸"),
    // Time
    ("Blue Midnight", "🕛"),
    ("Golden Sunrise", "🌄"),
    ("Red Sunset", "🌆"),
    ("Violet Twilight", "🌇"),
    ("Northern Lights", "✨"),
    ("Green Solstice", "🌞"),
    ("Grey Equinox", "⚖️"),
    ("Black Eclipse", "🌑"),
    ("Brief Eternity", "♾️"),
    ("Endless Moment", "⏰"),
    ("Eternal Second", "⏱️"),
    ("Magic Minute", "🎯"),
    ("Lost Hour", "🕐"),
    ("Grey Day", "📅"),
    ("Long Week", "📆"),
    ("Short Month", "🗓️"),
    ("New Year", "🎊"),
    ("Past Century", "📜"),
    ("Uncertain Future", "🔮"),
    ("Eternal Present", "🎁"),
    // Nature
    ("Whispering Woods", "🌳"),
    ("Deep Ocean", "🐋"),
    ("Endless Dunes", "🐪"),
    ("Eternal Glacier", "🏔"),
    ("Green Meadow", "🌾"),
    ("Dense Jungle", "🌿"),
    ("Mirror Lake", "🪞"),
    ("Singing Waterfall", "💦"),
    ("Lost Island", "🗿"),
    ("Colorful Reef", "🪸"),
    // Food and objects
    ("Hot Pizza", "🍕"),
    ("Black Coffee", "☕"),
    ("Cold Ice Cream", "🍦"),
    ("Tasty Taco", "🌮"),
    ("Big Burger", "🍔"),
    ("Fresh Sushi", "🍣"),
    ("Sweet Chocolate", "🍫"),
    ("Old Book", "📖"),
    ("Golden Key", "🔑"),
    ("Shining Sword", "⚔️"),
    ("Royal Crown", "👑"),
    ("Magic Ring", "💍"),
    ("Ancient Map", "🗺️"),
    // Space
    ("Blue Planet", "🌏"),
    ("Shooting Star", "🌠"),
    ("Full Moon", "🌕"),
    ("Swift Meteor", "🌟"),
    ("Lost Satellite", "🛰️"),
    ("Space Rocket", "🚀"),
    ("Mysterious UFO", "🛸"),
    ("Black Hole", "⚫"),
    ("Big Bang", "💥"),
];
