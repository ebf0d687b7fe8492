use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing table could not be read or written
    // Only a persistent backend can fail this way
    #[allow(dead_code)]
    #[error("Backend error: {0}")]
    Backend(String),

    /// Every generated id collided with an existing page
    #[error("No free page id after {0} attempts")]
    IdSpaceExhausted(usize),
}
