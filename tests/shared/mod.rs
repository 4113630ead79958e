/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(dead_code)] // not every test binary uses every helper

use ::lintol::{Matrix, Vector};
use ::lintol_assert_close::canonical_column_signs;
use ::serde::Deserialize;
use ::std::fs::File;
use ::std::path::PathBuf;

pub fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources").join(name)
}

pub fn load_json<T: for<'de> Deserialize<'de>>(name: &str) -> T {
    let path = resource(name);
    let file = File::open(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
    ::serde_json::from_reader(file).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

/// A linear system with a known solution.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemFixture {
    pub matrix: Vec<Vec<f64>>,
    pub b: Vec<f64>,
    pub x: Vec<f64>,
}

impl SystemFixture {
    pub fn a(&self) -> Matrix { Matrix::from_rows(self.matrix.clone()).unwrap() }
    pub fn b(&self) -> Vector { Vector::new(self.b.clone()) }
}

pub fn init_logger() { let _ = ::env_logger::builder().is_test(true).try_init(); }

pub fn mat(rows: &[&[f64]]) -> Matrix {
    Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

/// Compare eigenvector columns with the (unnormalized) expected columns,
/// ignoring the sign of each column.
pub fn assert_eigenvectors(actual: &Matrix, expected_columns: &[&[f64]]) {
    let expected = Matrix::from_shape_fn((expected_columns[0].len(), expected_columns.len()), |(i, j)| {
        let col = Vector::new(expected_columns[j].to_vec());
        col[i] / col.norm()
    });
    assert_close!(
        abs=1e-8,
        canonical_column_signs(actual.as_array(), 1e-8),
        canonical_column_signs(expected.as_array(), 1e-8),
        "eigenvectors differ: {:?}", actual.to_rows(),
    );
}
