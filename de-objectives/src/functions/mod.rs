//! Objective functions, one per file.

mod abs_sum_product;
mod beale;
mod booth;
mod cumulative_sum_squares;
mod effective_health;
mod horses_and_jockeys;
mod matyas;
mod nonlinear_system;
mod rastrigin;
mod square_root_54;
mod sum_of_squares;

pub use abs_sum_product::abs_sum_product;
pub use beale::beale;
pub use booth::booth;
pub use cumulative_sum_squares::cumulative_sum_squares;
pub use effective_health::{effective_health_early, effective_health_late, effective_health_solo};
pub use horses_and_jockeys::horses_and_jockeys;
pub use matyas::matyas;
pub use nonlinear_system::nonlinear_system;
pub use rastrigin::rastrigin;
pub use square_root_54::square_root_54;
pub use sum_of_squares::sum_of_squares;
