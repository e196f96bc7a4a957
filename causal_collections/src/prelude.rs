// Copyright (c) "2023" . Marvin Hansen <marvin.hansen@gmail.com> All rights reserved.

// window types
pub use crate::window_type;
pub use crate::window_type::storage::WindowStorage;
pub use crate::window_type::storage_array::ArrayStorage;
pub use crate::window_type::storage_vec::VectorStorage;
pub use crate::window_type::SlidingWindow;