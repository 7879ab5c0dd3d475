pub mod airport;
pub mod flight;
pub mod search;
pub mod timeparse;

pub use flight::{Airline, BaggageInfo, Flight, FlightDuration, FlightLocation, Money};
pub use search::{
    ErrorResponse, FilterOptions, SearchCriteria, SearchMetadata, SearchRequest, SearchResponse,
    TimeRange,
};
