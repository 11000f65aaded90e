mod checksum;
mod excludes;
mod extract;
mod record;
mod walker;

pub use checksum::{checksum_file, checksum_reader};
pub use excludes::{ExcludeMatcher, ExcludePatterns};
pub use extract::{Addressing, FullPath, NameOnly, PathExtractor};
pub use record::{Checksum, FileMode, FileRecord, Timestamps};
pub use walker::{WalkOptions, walk, walk_pair};
