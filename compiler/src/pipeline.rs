// pipeline.rs: Build orchestration
//
// Owns the per-build tape state and runs the byte loop: profile lookup,
// symbol resolution, instruction encoding, finalization. Also computes
// build provenance for hermetic-output checks.
//
// Preconditions: the registry is populated before a build starts.
// Postconditions: returns the full instruction string, or the first error;
//                 no partial output escapes a failed build.
// Failure modes: unknown profile name, or a character whose encoding finds
//                no scratch cell.
// Side effects: none outside the build-owned tape.

use std::collections::BTreeSet;
use std::fmt;

use crate::codegen::{self, CodegenError, EncoderConfig};
use crate::registry::{MemoryProfile, Registry};
use crate::resolve;
use crate::tape::TapeState;

// ── Public types ────────────────────────────────────────────────────────────

/// Options for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Name of the memory profile to build against.
    pub profile: String,
    /// Append a pass that zeroes every touched cell, leaving a clean tape
    /// for code appended downstream.
    pub cleanup: bool,
    pub encoder: EncoderConfig,
}

impl BuildOptions {
    pub fn new(profile: impl Into<String>) -> Self {
        BuildOptions {
            profile: profile.into(),
            cleanup: false,
            encoder: EncoderConfig::default(),
        }
    }
}

/// A finished build.
#[derive(Debug)]
pub struct GeneratedCode {
    /// The complete instruction string, init snippet included.
    pub code: String,
    /// Cell indices that hold or held a nonzero value, ascending.
    pub touched: Vec<usize>,
}

#[derive(Debug)]
pub enum BuildError {
    UnknownProfile { name: String },
    Encode {
        index: usize,
        byte: u8,
        source: CodegenError,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnknownProfile { name } => {
                write!(f, "unknown memory profile '{}'", name)
            }
            BuildError::Encode {
                index,
                byte,
                source,
            } => {
                write!(f, "byte {} (0x{:02x}): {}", index, byte, source)
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Encode { source, .. } => Some(source),
            BuildError::UnknownProfile { .. } => None,
        }
    }
}

// ── Builder ─────────────────────────────────────────────────────────────────

/// Assembles one program per call. The registry is injected at construction;
/// every build takes a fresh tape from the profile seeds.
pub struct Builder<'a> {
    registry: &'a Registry,
    options: BuildOptions,
}

impl<'a> Builder<'a> {
    pub fn new(registry: &'a Registry, options: BuildOptions) -> Self {
        Builder { registry, options }
    }

    /// Compile `input` into a program that prints it byte-for-byte.
    ///
    /// Input bytes and validated seeds both lie in 0..=255, so simulated
    /// cells never leave byte range; what an interpreter does on cell
    /// wraparound is its own business and out of scope here.
    pub fn build(&self, input: &[u8]) -> Result<GeneratedCode, BuildError> {
        let profile = self
            .registry
            .lookup(&self.options.profile)
            .ok_or_else(|| BuildError::UnknownProfile {
                name: self.options.profile.clone(),
            })?;

        let mut tape = TapeState::from_profile(profile);
        let mut touched: BTreeSet<usize> = profile
            .seeds
            .iter()
            .enumerate()
            .filter(|(_, &seed)| seed != 0)
            .map(|(cell, _)| cell)
            .collect();

        let mut code = String::with_capacity(profile.init.len() + 16 * input.len());
        code.push_str(&profile.init);

        for (index, &byte) in input.iter().enumerate() {
            let r = resolve::resolve(byte, &tape.cells);
            let fragment = codegen::encode(r.cell, r.delta, &mut tape, &self.options.encoder)
                .map_err(|source| BuildError::Encode {
                    index,
                    byte,
                    source,
                })?;
            debug_assert_eq!(tape.cells[r.cell], i32::from(byte));
            touched.insert(r.cell);
            code.push_str(&fragment);
        }

        code.push_str(&codegen::move_to(&mut tape, 0));
        if self.options.cleanup {
            for &cell in &touched {
                code.push_str(&codegen::move_to(&mut tape, cell));
                code.push(codegen::LOOP_OPEN);
                code.push(codegen::DEC);
                code.push(codegen::LOOP_CLOSE);
                tape.cells[cell] = 0;
            }
            code.push_str(&codegen::move_to(&mut tape, 0));
        }

        Ok(GeneratedCode {
            code,
            touched: touched.into_iter().collect(),
        })
    }
}

// ── Provenance ──────────────────────────────────────────────────────────────

/// Provenance metadata for hermetic builds.
///
/// `source_hash`: SHA-256 of the raw input bytes.
/// `profile_fingerprint`: SHA-256 of the profile's canonical compact JSON.
/// `generator_version`: crate version from `Cargo.toml`.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub source_hash: [u8; 32],
    pub profile_fingerprint: [u8; 32],
    pub generator_version: &'static str,
}

impl Provenance {
    /// Hex string of the source hash (64 characters).
    pub fn source_hash_hex(&self) -> String {
        bytes_to_hex(&self.source_hash)
    }

    /// Hex string of the profile fingerprint (64 characters).
    pub fn profile_fingerprint_hex(&self) -> String {
        bytes_to_hex(&self.profile_fingerprint)
    }

    /// Serialize provenance as a JSON string for `--emit build-info`.
    pub fn to_json(&self) -> String {
        format!(
            "{{\n  \"source_hash\": \"{}\",\n  \"profile_fingerprint\": \"{}\",\n  \"generator_version\": \"{}\"\n}}\n",
            self.source_hash_hex(),
            self.profile_fingerprint_hex(),
            self.generator_version,
        )
    }
}

/// Compute provenance from the input bytes and the selected profile.
///
/// The profile fingerprint hashes `MemoryProfile::canonical_json()` so it is
/// stable independent of display formatting.
pub fn compute_provenance(input: &[u8], profile: &MemoryProfile) -> Provenance {
    use sha2::{Digest, Sha256};

    let source_hash = {
        let mut hasher = Sha256::new();
        hasher.update(input);
        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    };

    let profile_fingerprint = {
        let mut hasher = Sha256::new();
        hasher.update(profile.canonical_json().as_bytes());
        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    };

    Provenance {
        source_hash,
        profile_fingerprint,
        generator_version: env!("CARGO_PKG_VERSION"),
    }
}

fn bytes_to_hex(bytes: &[u8; 32]) -> String {
    let mut s = String::with_capacity(64);
    for b in bytes {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
    }
    s
}

// ── Tests ───────────────────────────────────────────────────────────────────
