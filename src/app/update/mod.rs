mod core;
mod playback;
mod runtime;
mod scroll;
mod settings;
mod vocab;

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    ProcessText {
        text: String,
        request_id: u64,
    },
    FetchReadAloud {
        text: String,
        request_id: u64,
    },
    AutoScrollToPhrase(usize),
}
