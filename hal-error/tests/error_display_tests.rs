//! Display formatting never panics and carries category/code/context.

use hal_error::Error;

#[test]
fn display_includes_category_code_message() {
    let err = Error::invalid_parameter();
    let text = format!("{err}");
    assert!(text.contains("Configuration"));
    assert!(text.contains("invalid parameter"));
}

#[test]
fn display_includes_context_when_present() {
    let err = Error::network_timeout().with_context("send_request");
    let text = format!("{err}");
    assert!(text.contains("send_request"));
}

#[test]
fn all_canonical_constructors_format() {
    let errors = [
        Error::device_not_found(),
        Error::initialization_failed(),
        Error::device_busy(),
        Error::driver_incompatible(),
        Error::feature_not_supported(),
        Error::driver_not_loaded(),
        Error::invalid_parameter(),
        Error::configuration_missing(),
        Error::parameter_out_of_range(),
        Error::out_of_memory(),
        Error::resource_exhausted(),
        Error::resource_locked(),
        Error::platform_not_supported(),
        Error::platform_constraint(),
        Error::connection_failed(),
        Error::network_timeout(),
        Error::validation_failed(),
        Error::invalid_state(),
        Error::internal_error(),
        Error::not_implemented(),
    ];
    for e in errors {
        assert!(!format!("{e}").is_empty());
    }
}
