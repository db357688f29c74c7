// 渲染表面模块 - 为各页面组装数据
//
// DOM/样式不在本仓库范围内；这一层止步于页面需要的数据
// 包含3个表面:首页、单部电影页、观影清单页

pub mod home;
pub mod individual;
pub mod watch_list;

pub use home::{CategoryRow, CategoryView, HomeSurface, MovieCard};
pub use individual::IndividualSurface;
pub use watch_list::WatchListSurface;
