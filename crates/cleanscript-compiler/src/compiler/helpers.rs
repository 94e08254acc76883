//! JavaScript runtime helpers injected into compiled output.
//!
//! Each helper is a fixed function declaration. The code generator raises a
//! flag in [`HelperFlags`] when it emits a construct that calls one, and the
//! flagged helpers are prepended to the output once per compile.
//!
//! | Helper | Flag | Used by |
//! |--------|------|---------|
//! | `$_in` | `membership` | `a in b` |
//! | `$_createIterable` | `iterable` | `for x in e:` |
//! | `range` | `range` | calls to `range(...)` |
//! | `$_deepEquals` | `deep_equals` | `==`/`!=` between two non-literals |

/// `$_in(val, obj)`: element test for arrays and strings, key test otherwise.
pub const MEMBERSHIP: &str = r#"function $_in(val, obj) {
    if (obj instanceof Array || typeof obj === "string") {
        return obj.indexOf(val) !== -1;
    }
    return val in obj;
}
"#;

/// `$_createIterable(object)`: arrays and strings as-is, sets as arrays,
/// anything else as its own enumerable keys.
pub const ITERABLE: &str = r#"function $_createIterable(object) {
    if (object.constructor === [].constructor || object.constructor === "".constructor) {
        return object;
    } else if (typeof Set !== "undefined" && object.constructor === Set) {
        return Array.from(object);
    }
    return Object.keys(object);
}
"#;

/// `range(start, end = 0, step = 1)`; a single argument counts up from 0.
pub const RANGE: &str = r#"function range(start, end = 0, step = 1) {
    if (arguments.length === 1) {
        end = start;
        start = 0;
    }
    let arr = [];
    for (; (end - start) * step > 0; start += step) arr.push(start);
    return arr;
}
"#;

/// `$_deepEquals(a, b)`: structural equality over arrays and plain objects.
pub const DEEP_EQUALS: &str = r#"function $_deepEquals(a, b) {
    if (a === b) return true;
    if (a === null || b === null || typeof a !== "object" || typeof b !== "object") return false;
    if (Object.getPrototypeOf(a) !== Object.getPrototypeOf(b)) return false;
    if (Array.isArray(a)) {
        if (a.length !== b.length) return false;
        for (let i = 0; i < a.length; i++) {
            if (!$_deepEquals(a[i], b[i])) return false;
        }
        return true;
    }
    const keys = Object.keys(a);
    if (keys.length !== Object.keys(b).length) return false;
    return keys.every(function (key) {
        return Object.prototype.hasOwnProperty.call(b, key) && $_deepEquals(a[key], b[key]);
    });
}
"#;

/// The strict-mode pragma, always the first line when present.
pub const STRICT_PRAGMA: &str = "\"use strict\";\n";

/// Which helpers a single compile needs.
///
/// Starts all-false for every compile and is discarded afterwards, so flags
/// never leak from one input into the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelperFlags {
    /// `$_in` is called
    pub membership: bool,
    /// `$_createIterable` is called
    pub iterable: bool,
    /// `range` is called
    pub range: bool,
    /// `$_deepEquals` is called
    pub deep_equals: bool,
}

impl HelperFlags {
    /// Concatenates the flagged helpers in their fixed order.
    pub fn prologue(&self) -> String {
        [
            (self.membership, MEMBERSHIP),
            (self.iterable, ITERABLE),
            (self.range, RANGE),
            (self.deep_equals, DEEP_EQUALS),
        ]
        .into_iter()
        .filter(|(needed, _)| *needed)
        .map(|(_, source)| source)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_flags_have_no_prologue() {
        let flags = HelperFlags::default();
        assert_eq!(flags.prologue(), "");
    }

    #[test]
    fn test_prologue_order_is_fixed() {
        let flags = HelperFlags {
            membership: true,
            iterable: true,
            range: true,
            deep_equals: true,
        };
        let prologue = flags.prologue();
        let positions: Vec<usize> = ["function $_in", "function $_createIterable", "function range", "function $_deepEquals"]
            .iter()
            .filter_map(|name| prologue.find(name))
            .collect();
        assert_eq!(positions.len(), 4);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_helper() {
        let flags = HelperFlags {
            range: true,
            ..HelperFlags::default()
        };
        assert_eq!(flags.prologue(), RANGE);
    }
}
