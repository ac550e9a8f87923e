/// Coarse classification of a market data failure.
///
/// The HTTP layer only distinguishes two outcomes, so every error
/// collapses into one of these.
///
/// | Kind | HTTP status | Upstream contacted? |
/// |------|-------------|---------------------|
/// | `InvalidInput` | 400 | No |
/// | `Upstream` | 500 | Yes |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The caller sent a request that can never succeed (e.g. an empty search query).
    /// Rejected before any upstream call is made.
    InvalidInput,

    /// The upstream call failed. Transient and permanent failures are not
    /// distinguished and nothing is retried.
    Upstream,
}
