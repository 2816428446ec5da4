use gbapp::bootstrap::Bootstrapped;
use gbapp::config::*;
use gbapp::error::{Error, ErrorKind};
use gbapp::extensions::{Capabilities, ExtensionStrings};
use gbapp::lifecycle::{Lifecycle, WindowState};

trait FailToCompileIfNotSendSync
where
    Self: Send + Sync,
{
}
impl FailToCompileIfNotSendSync for Error {}
impl FailToCompileIfNotSendSync for ErrorKind {}
impl FailToCompileIfNotSendSync for Capabilities {}
impl FailToCompileIfNotSendSync for ExtensionStrings {}
impl<F: Send + Sync> FailToCompileIfNotSendSync for Bootstrapped<F> {}
impl FailToCompileIfNotSendSync for AppAttributes {}
impl FailToCompileIfNotSendSync for WindowAttributes {}
impl FailToCompileIfNotSendSync for PixelFormatAttributes {}
impl FailToCompileIfNotSendSync for ContextAttributes {}
impl FailToCompileIfNotSendSync for SwapInterval {}
impl FailToCompileIfNotSendSync for Lifecycle {}
impl FailToCompileIfNotSendSync for WindowState {}
