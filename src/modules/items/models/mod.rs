mod item;

pub use item::{
    normalize_category, Item, ItemDiscountResponse, ItemRequest, ItemResponse, ItemValueResponse,
    NewItem, StockUpdateRequest, MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN, MAX_PRICE, MAX_TITLE_LEN,
};
