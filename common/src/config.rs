#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// Resolve from DNS alone, skipping reachability probing and the
    /// remote self-identification stages.
    ///
    /// Trades accuracy for speed; directory and DNS domains are not
    /// distinguished in this mode.
    pub turbo: bool,

    /// Return degradations as per-host errors instead of logging them
    /// as warnings and falling back.
    pub strict: bool,
}
