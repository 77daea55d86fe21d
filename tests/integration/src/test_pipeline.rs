//! Full pipeline tests: files in, deployment plan out.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use finance_infra_core::InfraConfig;
    use finance_infra_synth::stacks::{AUTH_STACK_NAME, SITE_STACK_NAME, TABLE_STACK_NAME};
    use finance_infra_synth::{StackOutputRegistry, synthesize};
    use serde_json::Value;

    use crate::{flat_outputs, sample_document, synthesize_document, write_json};

    fn run(dir: &Path, out: &str) -> std::path::PathBuf {
        let config_path = write_json(dir, "config.json", &sample_document());
        let outputs_path = write_json(dir, "outputs.json", &flat_outputs());

        let config = InfraConfig::load(&config_path).unwrap();
        let registry = StackOutputRegistry::load(&outputs_path).unwrap();
        let out = dir.join(out);
        synthesize(&config, &registry).unwrap().write_to(&out).unwrap();
        out
    }

    #[test]
    fn test_should_produce_exactly_three_stacks() {
        let dir = tempfile::tempdir().unwrap();
        let out = run(dir.path(), "cdk.out");

        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(out.join("manifest.json")).unwrap()).unwrap();
        let ids: Vec<&str> = manifest["stacks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![AUTH_STACK_NAME, TABLE_STACK_NAME, SITE_STACK_NAME]);

        for id in ids {
            assert!(out.join(format!("{id}.template.json")).is_file());
        }
        assert_eq!(fs::read_dir(&out).unwrap().count(), 4);
    }

    #[test]
    fn test_should_write_byte_identical_plans() {
        let dir = tempfile::tempdir().unwrap();
        let first = run(dir.path(), "first");
        let second = run(dir.path(), "second");

        let mut names: Vec<_> = fs::read_dir(&first)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        names.sort();
        assert_eq!(names.len(), 4);
        for name in names {
            assert_eq!(
                fs::read(first.join(&name)).unwrap(),
                fs::read(second.join(&name)).unwrap(),
                "{name:?} differs between runs"
            );
        }
    }

    #[test]
    fn test_should_record_plan_metadata_in_manifest() {
        let assembly = synthesize_document(&sample_document(), &flat_outputs()).unwrap();
        let manifest = assembly.manifest();

        let auth = assembly.stack(AUTH_STACK_NAME).unwrap();
        assert_eq!(auth.environment, "aws://123456789012/ap-northeast-1");
        assert_eq!(auth.tags["Created"], "20251026");
        assert_eq!(auth.tags["Environment"], "prod");
        assert_eq!(auth.warnings.len(), 1);

        let site = assembly.stack(SITE_STACK_NAME).unwrap();
        assert_eq!(
            site.external_dependencies,
            vec!["stack-finance-dashboard-backend".to_owned()]
        );
        assert_eq!(site.imports.len(), 1);

        assert!(manifest.parameters.iter().all(|p| p.owner_stack == AUTH_STACK_NAME));
    }
}
