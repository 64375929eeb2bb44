//! Error dialogs: the host service abstraction and the presentation policy

mod traits;
mod text;
mod presenter;
mod headless;
mod mock;
mod queued;
#[cfg(feature = "native-dialogs")]
mod native;

pub use traits::{
    DialogButton, DialogChoice, DialogHandle, DialogService, DialogSpec, DismissCallback,
    SharedDialogService,
};
pub use text::{DialogBranding, ErrorDialogText, DEFAULT_HELP_URL, DEFAULT_LINK_COLOR};
pub use presenter::{ErrorDialogPresenter, PresenterError, PresenterResult};
pub use headless::HeadlessDialogService;
pub use mock::MockDialogService;
pub use queued::{QueuedDialogService, UiDispatcher};
#[cfg(feature = "native-dialogs")]
pub use native::NativeDialogService;
