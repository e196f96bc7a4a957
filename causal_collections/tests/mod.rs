// Copyright (c) "2023" . Marvin Hansen <marvin.hansen@gmail.com> All rights reserved.

#![forbid(unsafe_code)]

#[cfg(test)]
mod window_array_backed_tests;

#[cfg(test)]
mod window_vector_backed_tests;