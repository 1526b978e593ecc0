//! Image resolution capability
//!
//! The engine asks a resolver for image bytes synchronously; a miss degrades
//! the illustrated layout to its no-image variant instead of failing the
//! report.

use std::path::PathBuf;

/// Resolves an image reference to its bytes
pub trait ImageResolver {
    fn resolve(&self, image_ref: &str) -> Option<Vec<u8>>;
}

/// Resolver that never finds an image (consolidated reports, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve(&self, _image_ref: &str) -> Option<Vec<u8>> {
        None
    }
}

/// Resolver probing a list of root directories for the referenced file
///
/// Roots are tried in order; the first readable file wins. Read failures
/// count as misses.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    roots: Vec<PathBuf>,
}

impl DirectoryResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl ImageResolver for DirectoryResolver {
    fn resolve(&self, image_ref: &str) -> Option<Vec<u8>> {
        for root in &self.roots {
            let candidate = root.join(image_ref);
            if candidate.is_file() {
                match std::fs::read(&candidate) {
                    Ok(bytes) => return Some(bytes),
                    Err(err) => {
                        tracing::warn!("failed to read image {}: {}", candidate.display(), err);
                    }
                }
            }
        }
        tracing::debug!("image reference {} did not resolve", image_ref);
        None
    }
}
