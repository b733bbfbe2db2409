/// Bridge error type returned by `POST /api` while the link button has not
/// been pressed (the v1 "unauthorized" family).
pub const ERR_LINK_BUTTON_NOT_PRESSED: i64 = 101;

/// Description the bridge pairs with [`ERR_LINK_BUTTON_NOT_PRESSED`].
pub const LINK_BUTTON_DESCRIPTION: &str = "link button not pressed";
