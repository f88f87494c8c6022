//! Core DICT types.

mod greeting;
mod reply;
mod response;

pub use greeting::Greeting;
pub use reply::{Reply, ReplyCode, StatusReply};
pub use response::{
    DatabaseInfo, DatabasesResponse, DefineResponse, Definition, HelpResponse, InfoResponse,
    MatchEntry, MatchResponse, StrategiesResponse, StrategyInfo,
};
