pub mod dashboard;
pub mod github_card;
pub mod help_bar;
pub mod navbar;
pub mod prompt_bar;
pub mod status;
pub mod weather_card;

pub use devdash_core::Component;

pub use dashboard::{Dashboard, DashboardProps};
pub use github_card::{GithubCard, GithubCardProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use navbar::{Navbar, NavbarProps};
pub use prompt_bar::{PromptBar, PromptBarProps};
pub use status::{spinner, status_lines, StatusText, SPINNERS};
pub use weather_card::{compass_point, WeatherCard, WeatherCardProps};
