// License below.
//! `B.cond`'s condition codes, restricted to the Z/N-only subset this
//! simulator models (no C or V, so HS/LO/MI/PL/VS/VC/HI/LS are absent).
use std::fmt;

/// A condition code tested by `B.cond`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Equal: `Z == 1`.
    Eq,
    /// Not equal: `Z == 0`.
    Ne,
    /// Signed greater than or equal: `N == 0`.
    Ge,
    /// Signed less than: `N == 1`.
    Lt,
    /// Signed greater than: `Z == 0 && N == 0`.
    Gt,
    /// Signed less than or equal: `Z == 1 || N == 1`.
    Le,
}

impl Condition {
    /// Maps the 4-bit encoded condition to a `Condition`, or `None` if the
    /// code is outside this subset's supported set. Unlike the ARM7TDMI's
    /// full condition field, an unrecognized code is not an error here —
    /// the caller treats it as "branch not taken" (see `check_raw`).
    pub fn from_bits(bits: u32) -> Option<Condition> {
        match bits & 0xF {
            0 => Some(Condition::Eq),
            1 => Some(Condition::Ne),
            10 => Some(Condition::Ge),
            11 => Some(Condition::Lt),
            12 => Some(Condition::Gt),
            13 => Some(Condition::Le),
            _ => None,
        }
    }

    /// Evaluates this condition against the Z and N flags.
    pub fn check(self, flag_z: bool, flag_n: bool) -> bool {
        match self {
            Condition::Eq => flag_z,
            Condition::Ne => !flag_z,
            Condition::Ge => !flag_n,
            Condition::Lt => flag_n,
            Condition::Gt => !flag_z && !flag_n,
            Condition::Le => flag_z || flag_n,
        }
    }
}

/// Evaluates a raw 4-bit condition code against the flags. Codes outside
/// this subset's supported set resolve to "not taken".
pub fn check_raw(bits: u32, flag_z: bool, flag_n: bool) -> bool {
    Condition::from_bits(bits).map_or(false, |c| c.check(flag_z, flag_n))
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            Condition::Eq => "eq",
            Condition::Ne => "ne",
            Condition::Ge => "ge",
            Condition::Lt => "lt",
            Condition::Gt => "gt",
            Condition::Le => "le",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn eq_and_ne_follow_zero_flag_only() {
        assert!(Condition::Eq.check(true, false));
        assert!(!Condition::Eq.check(false, false));
        assert!(Condition::Ne.check(false, true));
        assert!(!Condition::Ne.check(true, false));
    }

    #[test]
    fn gt_requires_both_flags_clear() {
        assert!(Condition::Gt.check(false, false));
        assert!(!Condition::Gt.check(true, false));
        assert!(!Condition::Gt.check(false, true));
    }

    #[test]
    fn le_is_true_if_either_flag_set() {
        assert!(Condition::Le.check(true, false));
        assert!(Condition::Le.check(false, true));
        assert!(!Condition::Le.check(false, false));
    }

    #[test]
    fn undefined_code_resolves_not_taken_rather_than_erroring() {
        assert!(!check_raw(2, true, true));
        assert!(!check_raw(15, false, false));
    }
}

/*
Licensed to the Apache Software Foundation (ASF) under one
or more contributor license agreements.  See the NOTICE file
distributed with this work for additional information
regarding copyright ownership.  The ASF licenses this file
to you under the Apache License, Version 2.0 (the
"License"); you may not use this file except in compliance
with the License.  You may obtain a copy of the License at

  http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing,
software distributed under the License is distributed on an
"AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
KIND, either express or implied.  See the License for the
specific language governing permissions and limitations
under the License.
*/
