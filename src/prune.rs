use sorted_vec::SortedVec;

use crate::config::Configuration;

/// Reduces a list of losing configurations to its "main" ones, the ones that
/// are not obviously built from smaller losing configurations.
///
/// For each configuration, in order:
/// - configurations of one or two groups are always kept;
/// - configurations made of 1s only are dropped;
/// - otherwise, trailing pairs of 1s are removed first, then every main
///   configuration found so far (except `[1]`) is removed as many times as
///   possible, as long as what remains is still losing. Whatever is left, if
///   anything, is kept.
///
/// The result depends on the order of `losing`, which is expected to be the
/// solver's order (increasing stick count). This is a reading aid, the AI
/// never uses it.
pub fn main_losing_configs(losing: &[Configuration]) -> Vec<Configuration> {
    let index = SortedVec::from_unsorted(losing.to_vec());
    let is_losing = |c: &Configuration| c.is_empty() || index.binary_search(c).is_ok();

    let mut main: Vec<Configuration> = vec![];
    for config in losing {
        if config.len() <= 2 {
            main.push(config.clone());
            continue;
        }
        if config.is_all_ones() {
            continue;
        }

        let ones = config.count(1);
        let mut pruned = config.without_smallest(ones - ones % 2);

        for lc in main.iter().skip(1) {
            while pruned.contains(lc) {
                match pruned.without(lc) {
                    Some(rest) if is_losing(&rest) => pruned = rest,
                    _ => break,
                }
            }
            if pruned.is_empty() {
                break;
            }
        }
        if !pruned.is_empty() {
            main.push(pruned);
        }
    }
    main
}
