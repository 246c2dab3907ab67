// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

mod auth_flow_test;
mod check_flow_test;
mod health_check;
mod helpers;
mod points_flow_test;
mod setup_database_test;
