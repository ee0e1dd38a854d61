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

use std::ops::Range;

use crate::{Clbit, Qubit};

/// Described the desired behavior of a Register.
pub trait Register {
    /// The type of bit stored by the [Register]
    type Bit;

    /// Returns the name of the [Register].
    fn name(&self) -> &str;
    /// Returns the size of the [Register].
    fn len(&self) -> usize;
    /// Checks if the [Register] holds no bits.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Checks if a bit exists within the [Register].
    fn contains(&self, bit: Self::Bit) -> bool;
    /// Finds the local index of a certain bit within [Register].
    fn find_index(&self, bit: Self::Bit) -> Option<u32>;
    /// Return an iterator over all the bits in the register
    fn bits(&self) -> impl ExactSizeIterator<Item = Self::Bit>;
}

// Registers own a contiguous run of the circuit's bits, in the order they were
// added to the circuit.
macro_rules! create_register {
    ($name:ident, $bit:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            name: String,
            range: Range<u32>,
        }

        impl $name {
            pub(crate) fn new(name: String, start: u32, size: u32) -> Self {
                Self {
                    name,
                    range: start..start + size,
                }
            }

            /// The circuit bit at local index `index`.
            ///
            /// # Panics
            ///
            /// If `index` is out of the register's bounds.
            #[inline]
            pub fn bit(&self, index: usize) -> $bit {
                assert!(
                    index < self.len(),
                    "index {index} out of range for register {}",
                    self.name
                );
                $bit(self.range.start + index as u32)
            }
        }

        impl Register for $name {
            type Bit = $bit;

            fn name(&self) -> &str {
                &self.name
            }

            fn len(&self) -> usize {
                self.range.len()
            }

            fn contains(&self, bit: Self::Bit) -> bool {
                self.range.contains(&bit.0)
            }

            fn find_index(&self, bit: Self::Bit) -> Option<u32> {
                self.contains(bit).then(|| bit.0 - self.range.start)
            }

            fn bits(&self) -> impl ExactSizeIterator<Item = Self::Bit> {
                self.range.clone().map($bit)
            }
        }
    };
}

create_register!(QuantumRegister, Qubit);
create_register!(ClassicalRegister, Clbit);
