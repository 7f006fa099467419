use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use super::ByteSource;

/// Bytes of a file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileBytes {
	path: PathBuf,
}

impl FileBytes {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ByteSource for FileBytes {
	fn open_read(&self) -> io::Result<Box<dyn Read + '_>> {
		Ok(Box::new(BufReader::new(File::open(&self.path)?)))
	}
}
