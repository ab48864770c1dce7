/// Rows per page on the invoices list
pub const ITEMS_PER_PAGE: i64 = 6;

/// Number of invoices shown in the "latest invoices" panel
pub const LATEST_INVOICES_LIMIT: i64 = 5;

/// Quiet period before a search input is committed to the URL (milliseconds)
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Path of the invoice list view; actions revalidate and redirect here
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for invalid invoice ID format
pub const ERR_INVALID_INVOICE_ID: &str = "Invalid invoice ID format";

/// Error message for rejected login attempts
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Error message when a referenced customer does not exist
pub const ERR_UNKNOWN_CUSTOMER: &str = "Customer does not exist";
