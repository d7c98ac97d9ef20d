//! Exit code constants for the dynargs CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, unsupported command kind)
//! - 2: Resolution failure (placeholder could not be resolved or substituted)
//! - 3: Parse failure (nested-parenthesis or PDDL input)
//! - 4: Conflict between dynamic and static search configuration

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or an unsupported command kind.
pub const USER_ERROR: i32 = 1;

/// Resolution failure: missing catalogue, bad fold index, missing anchor.
pub const RESOLUTION_FAILURE: i32 = 2;

/// Parse failure: malformed parenthesized expression or task file.
pub const PARSE_FAILURE: i32 = 3;

/// Dynamic search tokens collide with a static search configuration.
pub const CONFLICT_FAILURE: i32 = 4;
