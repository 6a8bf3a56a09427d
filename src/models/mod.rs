//! Data models for Visitor Desk

pub mod host;
pub mod lookup;
pub mod setting;
pub mod statistics;
pub mod visitor;

// Re-export commonly used types
pub use host::{CreateHost, Host};
pub use lookup::{Department, LookupEntry, LookupTable, VisitPurpose};
pub use setting::{Setting, UpdateSetting};
pub use statistics::{DashboardStats, DashboardWindows, StatisticsQuery, VisitorStatistics};
pub use visitor::{CheckInVisitor, Visitor, VisitorQuery, VisitorStatus};
