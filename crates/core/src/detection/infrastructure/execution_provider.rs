use ort::execution_providers::ExecutionProviderDispatch;

/// Execution providers to register on the detector session, most preferred
/// first.
///
/// ONNX Runtime silently falls back to its CPU provider when none of these
/// can be initialised, so an empty list simply means CPU.
pub fn preferred_execution_providers() -> Vec<ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    let providers = vec![ort::execution_providers::CoreMLExecutionProvider::default().build()];
    #[cfg(target_os = "windows")]
    let providers = vec![ort::execution_providers::DirectMLExecutionProvider::default().build()];
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let providers: Vec<ExecutionProviderDispatch> = Vec::new();

    log::debug!("Requesting {} accelerated execution provider(s)", providers.len());
    providers
}
