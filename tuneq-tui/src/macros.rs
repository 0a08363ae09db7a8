// =================================================================================
//  KEY HANDLER MACRO SYSTEM
// =================================================================================

/// Macro to define route key handlers with dispatch logic.
///
/// Usage:
/// ```ignore
/// handlers!(state, handle, key => {
///     fn name(KeyPattern, condition) { body }
///     ...
/// })
/// ```
///
/// Each arm evaluates to `Ok(RouteAction::None)` unless its body returns early.
/// Conditions are called with `&AppState`. The state, handle, and key
/// identifiers are passed explicitly to work around macro hygiene rules.
#[macro_export]
macro_rules! handlers {
    (
        $state:ident, $handle:ident, $key:ident => {
            $(
                fn $name:ident ( $pat:pat $(, $cond:expr)? ) $body:block
            )*
        }
    ) => {
        match $key {
            $(
                $pat $(if $cond(&*$state))? => {
                    $body
                    Ok($crate::router::RouteAction::None)
                },
            )*
            _ => Ok($crate::router::RouteAction::None),
        }
    }
}
