// registry.rs: Memory profile registry
//
// Named presets pairing a Brainfuck initialization snippet with the cell
// values it leaves behind. Profiles are hand-tuned so common byte ranges
// land close to some seed value. Builtins are compiled in; additional
// profiles can be loaded from JSON definition files.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ── Data types ──────────────────────────────────────────────────────────────

/// A named memory layout: the init instruction string and the seed value
/// each tape cell holds once it has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryProfile {
    pub name: String,
    pub init: String,
    pub seeds: Vec<i32>,
}

impl MemoryProfile {
    /// Compact JSON for fingerprinting. Field order is fixed by the struct
    /// definition, so the output is stable across runs.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).expect("internal: profile serialization cannot fail")
    }
}

/// Errors that can occur while populating the registry.
#[derive(Debug)]
pub enum RegistryError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        message: String,
    },
    DuplicateProfile {
        name: String,
    },
    InvalidProfile {
        name: String,
        reason: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            RegistryError::Parse { path, message } => {
                write!(f, "{}: {}", path.display(), message)
            }
            RegistryError::DuplicateProfile { name } => {
                write!(f, "duplicate profile '{}'", name)
            }
            RegistryError::InvalidProfile { name, reason } => {
                write!(f, "invalid profile '{}': {}", name, reason)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

// ── Builtin profiles ────────────────────────────────────────────────────────

// Init snippets run with the pointer at cell 0 and leave it there. The "Z"
// layouts interleave zero cells between seeds; the "C" layouts pack seeds
// contiguously. Numbers name the seed spacing.
const BUILTIN_PROFILES: &[(&str, &str, &[i32])] = &[
    (
        "16Z",
        "++++[>++++[>+[>+>>+++>>+++++>>+++++++<<<<<<<-]++[>>>>>>>>>+>>++>>+++>>++++<<<<<<<<<<<<<<<-]<-]<-]",
        &[0, 0, 0, 16, 0, 48, 0, 80, 0, 112, 0, 32, 0, 64, 0, 96, 0, 128],
    ),
    (
        "16C",
        "++++[>++++[>++[>>+>>++>>+++>>++++<<<<<<<<-]+[>+>>+++>>+++++>>+++++++<<<<<<<-]<-]<-]",
        &[0, 0, 0, 16, 32, 48, 64, 80, 96, 112, 128],
    ),
    (
        "32Z",
        "++++[>++++[>++[>+>>++>>+++>>++++<<<<<<<-]<-]<-]",
        &[0, 0, 0, 32, 0, 64, 0, 96, 0, 128],
    ),
    (
        "32C",
        "++++[>++++[>++[>+>++>+++>++++<<<<-]<-]<-]",
        &[0, 0, 0, 32, 64, 96, 128],
    ),
];

/// Instruction characters a profile init snippet may use. Output and input
/// are deliberately excluded: initialization must be silent.
const INIT_ALPHABET: &str = "><+-[]";

// ── Registry ────────────────────────────────────────────────────────────────

/// Memory profile registry. Read-only once populated; each build takes its
/// own copy of the seed values.
pub struct Registry {
    profiles: HashMap<String, MemoryProfile>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Empty registry. Most callers want [`Registry::with_builtins`].
    pub fn new() -> Self {
        Registry {
            profiles: HashMap::new(),
        }
    }

    /// Registry preloaded with the builtin profile table.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for &(name, init, seeds) in BUILTIN_PROFILES {
            registry
                .register(MemoryProfile {
                    name: name.to_string(),
                    init: init.to_string(),
                    seeds: seeds.to_vec(),
                })
                .expect("internal: builtin profile failed validation");
        }
        registry
    }

    /// Validate and add one profile.
    pub fn register(&mut self, profile: MemoryProfile) -> Result<(), RegistryError> {
        validate(&profile)?;
        if self.profiles.contains_key(&profile.name) {
            return Err(RegistryError::DuplicateProfile { name: profile.name });
        }
        self.profiles.insert(profile.name.clone(), profile);
        Ok(())
    }

    /// Load profiles from a JSON definition file (an array of profiles).
    /// Returns the number of profiles added.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, RegistryError> {
        let source = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let profiles: Vec<MemoryProfile> =
            serde_json::from_str(&source).map_err(|e| RegistryError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let count = profiles.len();
        for profile in profiles {
            self.register(profile)?;
        }
        Ok(count)
    }

    pub fn lookup(&self, name: &str) -> Option<&MemoryProfile> {
        self.profiles.get(name)
    }

    /// Profile names in sorted order, for deterministic listings.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

/// Reject profiles the generator cannot work with. Cell 0 must seed to zero
/// so every build carries a permanent zero sentinel for the scratch search.
fn validate(profile: &MemoryProfile) -> Result<(), RegistryError> {
    let fail = |reason: String| RegistryError::InvalidProfile {
        name: profile.name.clone(),
        reason,
    };

    if profile.name.is_empty() {
        return Err(fail("empty profile name".to_string()));
    }
    if profile.seeds.is_empty() {
        return Err(fail("profile has no seed cells".to_string()));
    }
    if profile.seeds[0] != 0 {
        return Err(fail(format!(
            "cell 0 must seed to zero, found {}",
            profile.seeds[0]
        )));
    }
    for (cell, &seed) in profile.seeds.iter().enumerate() {
        if !(0..=255).contains(&seed) {
            return Err(fail(format!("seed {} at cell {} outside 0..=255", seed, cell)));
        }
    }
    if let Some(bad) = profile.init.chars().find(|c| !INIT_ALPHABET.contains(*c)) {
        return Err(fail(format!("init snippet contains '{}'", bad)));
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────────────
