// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::fmt;
use std::path::{Path, PathBuf};

/// Replaces `#` in sample names.
const SHARP_MARKER: &str = "sh";
/// Replaces `b` in sample names.
const FLAT_MARKER: &str = "flat";
/// The file extension of every sample.
const SAMPLE_EXTENSION: &str = "wav";

/// Canonicalizes a sample name so it can be used as a file name. Every `#` becomes
/// "sh" and every `b` becomes "flat", wherever they appear. None of the names the
/// music theory model produces contain a `b` outside of an accidental, but a name
/// that did would be rewritten as well.
pub fn canonicalize(name: &str) -> String {
    name.replace('#', SHARP_MARKER).replace('b', FLAT_MARKER)
}

/// The directory a sample lives in beneath the samples root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleNamespace {
    /// Pitched samples, one per note name.
    Note,
    /// Spoken samples, one per word of an identity.
    Identity,
}

impl SampleNamespace {
    pub fn directory(self) -> &'static str {
        match self {
            SampleNamespace::Note => "note",
            SampleNamespace::Identity => "identity",
        }
    }
}

/// Refers to one sample by namespace and name, e.g. note "C#4".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleKey {
    namespace: SampleNamespace,
    name: String,
}

impl SampleKey {
    pub fn note(name: impl Into<String>) -> SampleKey {
        SampleKey {
            namespace: SampleNamespace::Note,
            name: name.into(),
        }
    }

    pub fn identity(name: impl Into<String>) -> SampleKey {
        SampleKey {
            namespace: SampleNamespace::Identity,
            name: name.into(),
        }
    }

    pub fn namespace(&self) -> SampleNamespace {
        self.namespace
    }

    /// The name as the music theory model spells it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path of the sample file beneath the given samples root.
    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(self.namespace.directory())
            .join(format!("{}.{}", canonicalize(&self.name), SAMPLE_EXTENSION))
    }
}

impl fmt::Display for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace.directory(), self.name)
    }
}

/// How the samples of a sound are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixMode {
    /// One after another.
    Sequential,
    /// All at once, each attenuated to leave headroom.
    Overlaid,
}

/// The samples that make up a musical entity and how to combine them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    samples: Vec<SampleKey>,
    mode: MixMode,
}

impl Sound {
    /// A sound made of exactly one sample.
    pub fn single(sample: SampleKey) -> Sound {
        Sound::sequential(vec![sample])
    }

    pub fn sequential(samples: Vec<SampleKey>) -> Sound {
        Sound {
            samples,
            mode: MixMode::Sequential,
        }
    }

    pub fn overlaid(samples: Vec<SampleKey>) -> Sound {
        Sound {
            samples,
            mode: MixMode::Overlaid,
        }
    }

    pub fn samples(&self) -> &[SampleKey] {
        &self.samples
    }

    pub fn mode(&self) -> MixMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize() {
        assert_eq!("Csh4", canonicalize("C#4"));
        assert_eq!("E4", canonicalize("E4"));
        assert_eq!("min", canonicalize("min"));
        // Every b is replaced, not only an accidental.
        assert_eq!("Bflat3", canonicalize("Bb3"));
        assert_eq!("flatflat", canonicalize("bb"));
        assert_eq!("Ashflat", canonicalize("A#b"));
    }

    #[test]
    fn test_sample_path() {
        let root = Path::new("/samples");
        assert_eq!(
            PathBuf::from("/samples/note/Gsh2.wav"),
            SampleKey::note("G#2").path(root)
        );
        assert_eq!(
            PathBuf::from("/samples/identity/3rd.wav"),
            SampleKey::identity("3rd").path(root)
        );
    }

    #[test]
    fn test_canonicalization_leaves_root_alone() {
        let root = Path::new("/srv/b#samples");
        assert_eq!(
            PathBuf::from("/srv/b#samples/identity/dim.wav"),
            SampleKey::identity("dim").path(root)
        );
    }
}
