//! docsearch-bootstrap - 启动装配
//!
//! 把配置、遥测与传输层装配成可用的搜索基础设施

mod infrastructure;
mod runtime;

pub use infrastructure::*;
pub use runtime::*;
