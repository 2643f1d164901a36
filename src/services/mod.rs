pub mod drive;
pub mod geocode;
pub mod routing;
pub mod storage;
