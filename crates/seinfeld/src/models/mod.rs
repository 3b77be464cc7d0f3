mod episode;
mod passage;
mod quote;
mod season;
mod speaker;

pub use self::episode::{Episode, Episodes};
pub(crate) use self::episode::EpisodeRow;
pub use self::passage::Passage;
pub use self::quote::Quote;
pub(crate) use self::quote::QuoteRow;
pub use self::season::{Season, Seasons};
pub use self::speaker::{Speaker, Speakers};
