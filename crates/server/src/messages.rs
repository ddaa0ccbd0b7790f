//! Messages carried by the response envelopes.

pub const CATEGORY_CREATED: &str = "Category created successfully";
pub const CATEGORY_UPDATED: &str = "Category updated successfully";
pub const SUB_CATEGORY_CREATED: &str = "Sub category created successfully";
pub const SUB_CATEGORY_UPDATED: &str = "Sub category updated successfully";
pub const ITEM_CREATED: &str = "Item created successfully";
pub const ITEM_UPDATED: &str = "Item updated successfully";
pub const DATA_FOUND: &str = "Data found successfully";
pub const DATA_NOT_FOUND: &str = "Data not found";
pub const ROUTE_NOT_FOUND: &str = "Route not found";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong";
