// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod events_handler;
pub mod image_handler;
pub mod metrics_handler;
pub mod page_handler;
