/// Commonly used types and other abstractions within the parser
pub mod types;

/// A submodule that provides the parser output, the [RawTree].
/// Every brace delimited scope of the save file becomes a [RawSection] and
/// every `key=value` line or bare value becomes a [RawAttribute]. The tree
/// has no knowledge of what the sections mean, that is left to the
/// [structures](super::structures).
mod raw_tree;
pub use raw_tree::{KeyError, RawAttribute, RawSection, RawTree, SectionId, SectionRef, ROOT_NAME};

/// A submodule that provides the [TreeBuilder], the single pass, line based
/// builder of the [RawTree].
mod tree_builder;
pub use tree_builder::TreeBuilder;

mod error;
pub use error::ParsingError;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<RawTree, ParsingError> {
        RawTree::parse(contents.lines())
    }

    #[test]
    fn test_save_file() -> Result<(), Box<dyn std::error::Error>> {
        let tree = parse(
            "
        test={
            test2={
                test3=1
            }
        }
        ",
        )?;
        let test = tree.root().child_err("test")?;
        let test2 = test.child_err("test2")?;
        assert_eq!(test2.attribute_value_err("test3")?, "1");
        assert_eq!(test2.path(), "Root/test/test2");
        Ok(())
    }

    #[test]
    fn test_single_line_list() -> Result<(), Box<dyn std::error::Error>> {
        let tree = parse("planet={ 3 7 12 }")?;
        let planet = tree.root().child_err("planet")?;
        assert_eq!(planet.attributes().len(), 1);
        assert_eq!(planet.attributes()[0].name(), None);
        assert_eq!(planet.attributes()[0].value(), "3 7 12");
        assert_eq!(planet.sections().count(), 0);
        Ok(())
    }

    #[test]
    fn test_empty_single_line() -> Result<(), Box<dyn std::error::Error>> {
        let tree = parse(
            "
            x={}
            y={
            }
            ",
        )?;
        let x = tree.root().child_err("x")?;
        assert_eq!(x.attributes().len(), 1);
        assert_eq!(x.attributes()[0].value(), "");
        let y = tree.root().child_err("y")?;
        assert!(y.attributes().is_empty());
        Ok(())
    }

    #[test]
    fn test_ordering() -> Result<(), Box<dyn std::error::Error>> {
        let tree = parse(
            "
        hyperlane={
            {
                to=7
                length=3.2
            }
            {
                to=2
                length=1.5
            }
        }
        b=2
        a=1
        ",
        )?;
        let root = tree.root();
        let names = root
            .attributes()
            .iter()
            .map(|a| a.name().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "a"]);
        let lanes = root.child_err("hyperlane")?;
        let targets = lanes
            .sections()
            .map(|s| s.attribute_value("to").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(targets, vec!["7", "2"]);
        for lane in lanes.sections() {
            assert_eq!(lane.name(), None);
            let names = lane
                .attributes()
                .iter()
                .map(|a| a.name().unwrap())
                .collect::<Vec<_>>();
            assert_eq!(names, vec!["to", "length"]);
        }
        Ok(())
    }

    #[test]
    fn test_quoting() -> Result<(), Box<dyn std::error::Error>> {
        let tree = parse(
            "
        name=\"Sol\"
        required_dlcs={
            \"Utopia\"
            \"Leviathans Story Pack\"
        }
        ",
        )?;
        let root = tree.root();
        assert_eq!(root.attribute_value("name"), Some("Sol"));
        let dlcs = root.child_err("required_dlcs")?;
        assert_eq!(
            dlcs.values().collect::<Vec<_>>(),
            vec!["\"Utopia\"", "\"Leviathans Story Pack\""]
        );
        Ok(())
    }

    #[test]
    fn test_space() -> Result<(), Box<dyn std::error::Error>> {
        let tree = parse(
            "
        test = {
            test2 = {
                test3 = 1
            }
            test4 = { a b c}
        }
        ",
        )?;
        let test = tree.root().child_err("test")?;
        assert_eq!(
            test.child_err("test2")?.attribute_value_err("test3")?,
            "1"
        );
        let test4 = test.child_err("test4")?;
        assert_eq!(test4.values().collect::<Vec<_>>(), vec!["a b c"]);
        Ok(())
    }

    #[test]
    fn test_unnamed_obj() -> Result<(), Box<dyn std::error::Error>> {
        let tree = parse(
            "
        player={
            {
                name=\"unknown\"
                country=0
            }
        }
        ",
        )?;
        let player = tree.root().child_err("player")?;
        let entry = player.first_section().unwrap();
        assert_eq!(entry.name(), None);
        assert_eq!(entry.path(), "Root/player/*");
        assert_eq!(entry.attribute_value("country"), Some("0"));
        Ok(())
    }

    #[test]
    fn test_duplicate_top_level() -> Result<(), Box<dyn std::error::Error>> {
        let tree = parse(
            "
        nebula={
            name=\"first\"
        }
        galactic_object={
        }
        nebula={
            name=\"second\"
        }
        ",
        )?;
        let root = tree.root();
        assert_eq!(root.sections().count(), 2);
        let nebula = root.child_err("nebula")?;
        assert!(nebula.is_synthetic());
        let names = nebula
            .sections()
            .map(|s| s.attribute_value("name").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["first", "second"]);
        assert!(!root.child_err("galactic_object")?.is_synthetic());
        Ok(())
    }

    #[test]
    fn test_nested_duplicates_untouched() -> Result<(), Box<dyn std::error::Error>> {
        let tree = parse(
            "
        test={
            a={
            }
            a={
            }
        }
        ",
        )?;
        let test = tree.root().child_err("test")?;
        assert_eq!(test.sections().count(), 2);
        assert!(test.sections().all(|s| !s.is_synthetic()));
        Ok(())
    }

    #[test]
    fn test_unbalanced() {
        assert!(matches!(
            parse("test={\n test2={\n }\n"),
            Err(ParsingError::UnterminatedScope { depth: 1 })
        ));
        assert!(matches!(
            parse("test={\n}\n}\ntest2={\n}"),
            Err(ParsingError::UnexpectedClose { line: 3 })
        ));
    }

    #[test]
    fn test_parents() -> Result<(), Box<dyn std::error::Error>> {
        let tree = parse(
            "
        a={
            b={
                c=1
            }
        }
        ",
        )?;
        let b = tree.root().child_err("a")?.child_err("b")?;
        let attribute = &b.attributes()[0];
        assert_eq!(attribute.parent(), b.id());
        assert_eq!(tree[b.id()].name(), Some("b"));
        let a = b.parent().unwrap();
        assert_eq!(a.name(), Some("a"));
        assert!(a.parent().unwrap().is_root());
        Ok(())
    }
}
