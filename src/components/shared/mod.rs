mod changeset;
mod row_list;
mod view_pool;

pub use changeset::Changeset;
pub use row_list::RowList;
pub use view_pool::ViewPool;
