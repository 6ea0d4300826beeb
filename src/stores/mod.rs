pub mod ids;
pub mod storage;
pub mod table;
