//! Catalog commands: browse and categories.

use clap::{Args, ValueEnum};

use sweetshop_client::gateway::{SortBy, SortOrder, SweetQuery};
use sweetshop_client::{ClientError, SweetShop};
use sweetshop_core::Price;

/// Filters for `sweetshop browse`, forwarded to the gateway as query
/// parameters.
#[derive(Args)]
pub struct BrowseArgs {
    /// Filter by category name
    #[arg(short, long)]
    category: Option<String>,

    /// Search in name and description
    #[arg(short, long)]
    search: Option<String>,

    /// Only featured sweets
    #[arg(long)]
    featured: bool,

    /// Minimum price
    #[arg(long)]
    min_price: Option<Price>,

    /// Maximum price
    #[arg(long)]
    max_price: Option<Price>,

    /// Sort key
    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    /// Sort direction
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Pagination offset
    #[arg(long)]
    skip: Option<u32>,

    /// Page size (gateway caps at 100)
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    Name,
    Price,
    Rating,
    Newest,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => Self::Name,
            SortArg::Price => Self::Price,
            SortArg::Rating => Self::Rating,
            SortArg::Newest => Self::CreatedAt,
        }
    }
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => Self::Asc,
            OrderArg::Desc => Self::Desc,
        }
    }
}

/// List sweets matching the given filters.
pub async fn browse(shop: &SweetShop, args: BrowseArgs) -> Result<(), ClientError> {
    let query = SweetQuery {
        category: args.category,
        search: args.search,
        featured: args.featured.then_some(true),
        min_price: args.min_price,
        max_price: args.max_price,
        sort_by: args.sort.map(Into::into),
        sort_order: args.order.map(Into::into),
        skip: args.skip,
        limit: args.limit,
    };

    let sweets = shop.sweets(&query).await?;
    if sweets.is_empty() {
        println!("No sweets match");
        return Ok(());
    }

    for sweet in sweets {
        let stock = if sweet.stock == 0 {
            " [out of stock]".to_string()
        } else {
            format!(" (stock {})", sweet.stock)
        };
        let featured = if sweet.featured { " *" } else { "" };
        println!(
            "{}  {} - {} ({}, {:.1}/5 from {} reviews){}{}",
            sweet.id, sweet.name, sweet.price, sweet.weight, sweet.rating, sweet.reviews, stock, featured
        );
    }
    Ok(())
}

/// List categories with live item counts.
pub async fn categories(shop: &SweetShop) -> Result<(), ClientError> {
    for category in shop.categories().await? {
        println!("{} {} ({})", category.icon, category.name, category.count);
    }
    Ok(())
}
