mod bottom;
mod central;
mod helpers;
mod records;
mod top;

pub use bottom::render_bottom_panel;
pub use central::render_central_panel;
pub use records::render_records_panel;
pub use top::render_top_panel;
