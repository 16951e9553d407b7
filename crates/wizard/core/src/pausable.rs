//! Pausability feature module.

use crate::access::{require_access_control, Access, ContractLibrary};
use crate::contract::ContractBuilder;
use crate::function::{BaseFunction, FunctionKind};
use lazy_static::lazy_static;

struct Functions {
    pause: BaseFunction,
    unpause: BaseFunction,
}

lazy_static! {
    static ref FUNCTIONS: Functions = Functions {
        pause: BaseFunction::new("pause", FunctionKind::Public),
        unpause: BaseFunction::new("unpause", FunctionKind::Public),
    };
}

/// Add `Pausable`, gated `pause()`/`unpause()` and a `whenNotPaused`
/// modifier on each of `hooks`.
pub fn add_pausable(
    c: &mut ContractBuilder,
    access: Access,
    hooks: &[&BaseFunction],
    library: ContractLibrary,
) {
    c.add_parent(library.parent("Pausable", "security/Pausable.sol"), vec![]);

    for hook in hooks {
        c.add_modifier("whenNotPaused", hook);
    }

    require_access_control(c, &FUNCTIONS.pause, access, "PAUSER", library);
    c.add_function_code("_pause();", &FUNCTIONS.pause);

    require_access_control(c, &FUNCTIONS.unpause, access, "PAUSER", library);
    c.add_function_code("_unpause();", &FUNCTIONS.unpause);
}
