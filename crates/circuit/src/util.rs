// This code is part of Qiskit.
//
// (C) Copyright IBM 2025
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

use num_complex::Complex64;

// This is almost the same as the function that became available in
// num-complex 0.4.6. The difference is that two generic parameters are
// used here rather than one. This allows call like `c64(half_theta.cos(), 0);`
// that mix f64 and integer arguments.
/// Create a new [`Complex64`] with arguments that can convert [`Into<f64>`].
#[inline]
pub fn c64<T: Into<f64>, V: Into<f64>>(re: T, im: V) -> Complex64 {
    Complex64::new(re.into(), im.into())
}

pub type GateArray1Q = [[Complex64; 2]; 2];

pub const C_ZERO: Complex64 = Complex64::new(0., 0.);
pub const C_ONE: Complex64 = Complex64::new(1., 0.);
pub const C_M_ONE: Complex64 = Complex64::new(-1., 0.);
pub const IM: Complex64 = Complex64::new(0., 1.);
pub const M_IM: Complex64 = Complex64::new(0., -1.);
