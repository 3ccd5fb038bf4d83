// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! gigcal - a personal event calendar for gigs, meals, trips and workouts

use gigcal_cli::run;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    run()
}
