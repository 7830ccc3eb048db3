use super::{Config, Modifier};
use ldwm_core::models::MAX_TAGS;
use ldwm_core::utils::modmask_lookup::into_mod;
use std::collections::HashMap;

impl Config {
    /// Runs every check and prints the findings. Returns whether the configuration is usable
    /// as written.
    pub fn check(&self, verbose: bool) -> bool {
        println!("\x1b[0;94m::\x1b[0m Checking settings . . .");
        let settings = self.check_settings();
        report(&settings, "Settings", verbose);

        println!("\x1b[0;94m::\x1b[0m Checking window rules . . .");
        let rules = self.check_rules();
        report(&rules, "Window rules", verbose);

        println!("\x1b[0;94m::\x1b[0m Checking keybinds . . .");
        let keybinds = self.check_keybinds();
        report(&keybinds, "Keybinds", verbose);

        println!("\x1b[0;94m::\x1b[0m Checking mousebinds . . .");
        let mousebinds = self.check_mousebinds();
        report(&mousebinds, "Mousebinds", verbose);

        settings.is_empty() && rules.is_empty() && keybinds.is_empty() && mousebinds.is_empty()
    }

    fn check_settings(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.tags.is_empty() {
            problems.push("No tags are configured, a single tag will be used".to_owned());
        }
        if self.tags.len() > MAX_TAGS {
            problems.push(format!(
                "Only the first {MAX_TAGS} of {} tags will be used",
                self.tags.len()
            ));
        }
        if !(0.05..=0.95).contains(&self.mfact) {
            problems.push(format!("mfact {} is outside of 0.05 to 0.95", self.mfact));
        }
        if self.nmaster < 0 {
            problems.push(format!("nmaster {} is negative", self.nmaster));
        }
        if self.layouts.is_empty() {
            problems.push("No layouts are configured, the built-in ones will be used".to_owned());
        }
        if into_mod(&self.modkey).is_empty() {
            problems.push(format!("modkey `{}` is not a valid modifier", self.modkey));
        }
        for (name, value) in [
            ("border_width", self.border_width),
            ("padding", self.padding),
            ("snap", self.snap),
        ] {
            if value < 0 {
                problems.push(format!("{name} {value} is negative"));
            }
        }
        problems
    }

    fn check_rules(&self) -> Vec<String> {
        self.window_rules
            .iter()
            .filter_map(|rule| {
                let err = rule.try_convert_to_core_rule(self.tags.len()).err()?;
                Some(format!("{err:#} for rule {rule:?}"))
            })
            .collect()
    }

    /// Check all keybinds to ensure that required values are provided and that no key
    /// combination is bound twice.
    fn check_keybinds(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut bindings: HashMap<(Modifier, &str), _> = HashMap::new();
        for keybind in &self.keybind {
            if let Err(err) = keybind.try_convert_to_core_keybind(self) {
                problems.push(format!("{err:#} for keybind {keybind:?}"));
                continue;
            }

            let mut modifier = keybind
                .modifier
                .clone()
                .unwrap_or_else(|| Modifier::from("None"));
            modifier.sort_unstable();
            if let Some(conflict) = bindings.insert((modifier.clone(), &keybind.key), keybind) {
                problems.push(format!(
                    "Multiple commands bound to key combination {} + {}:\
                    \n    -> {:?}\
                    \n    -> {:?}\
                    \nHelp: change one of the keybindings to something else.",
                    modifier, keybind.key, conflict.command, keybind.command,
                ));
            }
        }
        problems
    }

    fn check_mousebinds(&self) -> Vec<String> {
        self.mousebind
            .iter()
            .filter_map(|mousebind| {
                let err = mousebind.try_convert_to_core_mousebind(self).err()?;
                Some(format!("{err:#} for mousebind {mousebind:?}"))
            })
            .collect()
    }
}

fn report(problems: &[String], section: &str, verbose: bool) {
    if problems.is_empty() {
        println!("\x1b[0;92m    -> {section} OK\x1b[0m");
        return;
    }
    for problem in problems {
        println!("\x1b[1;91mERROR: {problem}\x1b[0m");
    }
    if verbose {
        println!("    {} problem(s) in {section}", problems.len());
    }
}
