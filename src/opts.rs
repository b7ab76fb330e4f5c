use crate::subtitle::SynthOpts;

/// Options that control how a conversion is performed.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// Frontends map their input into this type so that:
/// - the library remains reusable outside of a CLI or server context
/// - tests can construct options programmatically
///
/// `Opts::default()` reproduces the fixed behavior the HTTP endpoint exposes.
#[derive(Debug, Clone, Default)]
pub struct Opts {
    /// Timing used by `text_to_srt`.
    pub synth: SynthOpts,
}
