// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod categories;
pub mod cards;
pub mod transactions;
pub mod invoice;
pub mod reports;
pub mod fx;
pub mod importer;
pub mod exporter;
pub mod doctor;
