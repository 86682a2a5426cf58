mod client;
mod fetcher;
mod listing_file;
mod tariff_page;

pub use self::{
    client::new_agent,
    fetcher::CachingFetcher,
    listing_file::ListingFile,
    tariff_page::TariffPage,
};
