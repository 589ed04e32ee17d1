pub mod convert;
pub mod evaluate;
pub mod export;
pub mod fit;
pub mod list;
pub mod resample;
pub mod set_param;
pub mod show;
