// Every variant states *where* things went wrong.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the buffer to the window failed
    #[error("Cursor init error: {0}")]
    CursorInit(String), // No display to read the global cursor from
    #[error("Asset load error ({}): {source}", path.display())]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Unknown face: {0}")]
    UnknownFace(String), // Asked for a face the preset table doesn't have
}
