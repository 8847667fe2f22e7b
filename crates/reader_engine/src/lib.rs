//! Reader engine: IO collaborators and async state-machine handles.
mod biometric;
mod gate;
mod loader;
mod source;

pub use biometric::{
    Authenticator, BiometricPlatform, CapabilityProber, ChallengeCallback, PlatformAuthenticator,
    PlatformProber, PromptInfo,
};
pub use gate::AccessGate;
pub use loader::{HeadlineLoader, LoaderSettings, DEFAULT_REFRESH_FLOOR, DEFAULT_SOURCE};
pub use source::{ContentSource, NewsApiSettings, NewsApiSource, DEFAULT_BASE_URL};
