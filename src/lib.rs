pub mod config;
pub mod logging;
pub mod remote;
pub mod source;
pub mod sources;
pub mod version;

pub use source::{DataSource, DataSourceOptions, RemoteFile, Source, SpecificVersionSource};
pub use sources::SourceName;
pub use version::error::{RemoteError, SourceError};
