//! # Command Line Definition
//!
//! ```text
//! hisi [--config FILE] [--api-url URL] [--ephemeral] [-v] <COMMAND>
//!
//!   login | logout | register | whoami | profile update | password
//!   products list|show|featured|categories
//!   reviews  list|stats|submit
//!   press    [page|coverage|exhibitions|releases]
//!   blog     list|show|search|featured|categories
//!   contact  send|info|faqs|testimonials
//!   newsletter subscribe|unsubscribe
//!   sections <PAGE> [SECTION]
//!   config   show|set-url
//!   admin    reviews ...|sections ...|press <VIEW>   (content managers and up)
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hisi_core::catalog::ReviewStatusFilter;
use hisi_core::{SortField, SortOrder};

#[derive(Debug, Parser)]
#[command(name = "hisi", version, about = "Hisi Studio storefront client")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Config file; defaults to HISI_CONFIG or the platform config dir.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding config and HISI_API_URL.
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Keep the session in memory; nothing is read from or written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    Login {
        email: String,
        #[arg(long, env = "HISI_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the session.
    Logout,

    /// Create an account and sign in.
    Register {
        email: String,
        #[arg(long, env = "HISI_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Show the signed-in user.
    Whoami,

    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Change the account password.
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },

    #[command(subcommand)]
    Products(ProductsCommand),

    #[command(subcommand)]
    Reviews(ReviewsCommand),

    /// Press page content.
    Press {
        #[arg(value_enum, default_value_t = PressView::Page)]
        view: PressView,
    },

    #[command(subcommand)]
    Blog(BlogCommand),

    #[command(subcommand)]
    Contact(ContactCommand),

    #[command(subcommand)]
    Newsletter(NewsletterCommand),

    /// Editable content of a page, or one of its sections.
    Sections {
        page: String,
        section: Option<String>,
    },

    #[command(subcommand)]
    Admin(AdminCommand),

    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Effective configuration and the file it is read from.
    Show,
    /// Save the backend base URL to the config file.
    SetUrl { url: String },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Change name or phone; omitted fields are left alone.
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Args)]
pub struct ListingArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long)]
    pub per_page: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// Browse the catalogue.
    List {
        #[command(flatten)]
        listing: ListingArgs,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        featured: bool,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        /// price, name or created_at
        #[arg(long, default_value_t = SortField::CreatedAt)]
        sort: SortField,
        /// asc or desc
        #[arg(long, default_value_t = SortOrder::Desc)]
        order: SortOrder,
    },

    /// One product by slug (or by id with --id).
    Show {
        key: String,
        #[arg(long)]
        id: bool,
    },

    Featured {
        #[arg(long)]
        limit: Option<u32>,
    },

    Categories,
}

#[derive(Debug, Subcommand)]
pub enum ReviewsCommand {
    /// Approved reviews, newest first.
    List {
        #[command(flatten)]
        listing: ListingArgs,
        #[arg(long)]
        product: Option<String>,
        #[arg(long)]
        featured: bool,
    },

    Stats {
        #[arg(long)]
        product: Option<String>,
    },

    /// Submit a review for moderation (requires login).
    Submit {
        /// 1 to 5 stars
        rating: u8,
        content: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        product: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PressView {
    Page,
    Coverage,
    Exhibitions,
    Releases,
}

// =============================================================================
// Content
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum BlogCommand {
    List {
        #[command(flatten)]
        listing: ListingArgs,
        #[arg(long)]
        category: Option<String>,
    },
    Show {
        slug: String,
    },
    Search {
        text: String,
    },
    Featured {
        #[arg(long)]
        limit: Option<u32>,
    },
    Categories,
}

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Send the contact form.
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
        /// general, custom, accessibility, partnership or press
        #[arg(long, default_value = "general")]
        category: String,
        #[arg(long)]
        subject: Option<String>,
    },
    Info,
    Faqs {
        #[arg(long)]
        category: Option<String>,
    },
    Testimonials {
        #[arg(long)]
        featured: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum NewsletterCommand {
    Subscribe { email: String },
    Unsubscribe { email: String },
}

// =============================================================================
// Admin
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    #[command(subcommand)]
    Reviews(AdminReviewsCommand),

    #[command(subcommand)]
    Sections(AdminSectionsCommand),

    /// Press collections and singletons, published or not.
    Press {
        #[arg(value_enum)]
        view: AdminPressView,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdminPressView {
    Coverage,
    Releases,
    Exhibitions,
    Speaking,
    Collaborations,
    Hero,
    Contact,
    MediaKit,
}

#[derive(Debug, Subcommand)]
pub enum AdminReviewsCommand {
    /// Moderation queue.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// all, pending or approved
        #[arg(long, default_value_t = ReviewStatusFilter::All)]
        status: ReviewStatusFilter,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
    },
    Feature {
        id: String,
        /// Remove the featured flag instead.
        #[arg(long)]
        off: bool,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminSectionsCommand {
    /// Every section item, optionally for one page.
    List {
        #[arg(long)]
        page: Option<String>,
    },
    /// Replace one item's value; VALUE is parsed as JSON, else taken as text.
    Set {
        id: String,
        value: String,
    },
    Delete {
        id: String,
    },
}
