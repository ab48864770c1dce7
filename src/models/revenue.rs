use serde::{Deserialize, Serialize};

/// Monthly revenue figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Revenue {
    pub month: String,
    pub revenue: i32,
}
