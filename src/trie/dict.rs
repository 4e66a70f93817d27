//! Dictionary file loading.
//!
//! A dictionary line is `<keyword> [<frequency>] [...ignored]`: whitespace
//! separated, frequency defaults to 1, and anything after the frequency
//! (e.g. a part-of-speech tag) is ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::state_id::NodeId;

use super::Trie;

impl<N: NodeId> Trie<N> {
    /// Inserts every keyword in the dictionary file at `path`.
    ///
    /// Blank lines are skipped. A malformed frequency field (present but
    /// not a valid `u32`) falls back to the default of 1 rather than
    /// failing the whole load, since it's indistinguishable from a
    /// keyword that merely contains a space-separated annotation the
    /// caller doesn't expect this format to carry.
    pub fn load_dict<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        for line in reader.lines() {
            let line = line.map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let mut fields = line.split_whitespace();
            let Some(keyword) = fields.next() else {
                continue;
            };
            let freq = fields.next().and_then(|f| f.parse().ok()).unwrap_or(1);
            self.insert(keyword, freq)?;
        }

        log::info!("loaded dictionary {}", path.display());
        Ok(())
    }

    /// Loads `path` and finalizes the automaton in one step.
    pub fn build_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut trie = Self::new();
        trie.load_dict(path)?;
        trie.build()?;
        Ok(trie)
    }

    /// Loads every dictionary in `paths`, in order, then finalizes.
    pub fn build_from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut trie = Self::new();
        for path in paths {
            trie.load_dict(path)?;
        }
        trie.build()?;
        Ok(trie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_keyword_frequency_pairs_and_defaults_missing_frequency() {
        let file = tempfile_with_content("武汉 10\n长江\n大桥 4 n\n");
        let mut trie: Trie<u32> = Trie::new();
        trie.load_dict(file.path()).unwrap();
        trie.build().unwrap();

        assert_eq!(trie.word_count(), 3);
        assert_eq!(trie.trans_string("长江").unwrap().end, 1);
        trie.reset_to_root();
        assert_eq!(trie.trans_string("大桥").unwrap().end, 4);
    }

    #[test]
    fn missing_file_reports_io_error() {
        let result = Trie::<u32>::build_from_file("/nonexistent/path/does-not-exist.dict");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    fn tempfile_with_content(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }
}
