//! Tests for HomeworkService with an in-memory filesystem

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use snailfish::application::services::HomeworkService;
use snailfish::application::ApplicationError;
use snailfish::config::Settings;
use snailfish::domain::DomainError;
use snailfish::infrastructure::traits::FileSystem;
use snailfish::util::testing;

/// Mock filesystem serving files from a map and recording reads
struct MockFileSystem {
    files: HashMap<PathBuf, String>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MockFileSystem {
    fn with_file(path: &str, content: &str) -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from(path), content.to_string());
        Self {
            files,
            reads: Mutex::new(Vec::new()),
        }
    }

    fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap().clone()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

const HOMEWORK: &str = "\
[[[0,[5,8]],[[1,7],[9,6]]],[[4,[1,2]],[[1,4],2]]]
[[[5,[2,8]],4],[5,[[9,9],0]]]
[6,[[[6,2],[5,6]],[[7,6],[4,7]]]]
[[[6,[0,7]],[0,9]],[4,[9,[9,0]]]]
[[[7,[6,4]],[3,[1,3]]],[[[5,5],1],9]]
[[6,[[7,3],[3,2]]],[[[3,8],[5,7]],4]]
[[[[5,4],[7,7]],8],[[8,3],8]]
[[9,3],[[9,9],[6,[4,9]]]]
[[2,[[7,7],7]],[[5,8],[[9,3],[0,2]]]]
[[[[5,2],5],[8,[3,7]]],[[5,[7,5]],[4,4]]]
";

fn service(fs: Arc<MockFileSystem>) -> HomeworkService {
    testing::init_test_setup();
    HomeworkService::new(fs, &Settings::default())
}

#[test]
fn given_homework_file_when_solving_then_returns_both_answers() {
    let fs = Arc::new(MockFileSystem::with_file("/hw/input.txt", HOMEWORK));
    let service = service(Arc::clone(&fs));

    let literals = service.load(Path::new("/hw/input.txt")).unwrap();
    let homework = service.solve(&literals).unwrap();

    assert_eq!(homework.sum.magnitude, 4140);
    assert_eq!(homework.largest.magnitude, 3993);
    assert_eq!(fs.reads(), vec![PathBuf::from("/hw/input.txt")]);
}

#[test]
fn given_missing_file_when_loading_then_operation_failed_names_path() {
    let fs = Arc::new(MockFileSystem::with_file("/hw/input.txt", HOMEWORK));
    let service = service(fs);

    let err = service.load(Path::new("/hw/other.txt")).unwrap_err();
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("/hw/other.txt"));
}

#[test]
fn given_malformed_line_when_loading_then_error_carries_line_number() {
    let fs = Arc::new(MockFileSystem::with_file(
        "/hw/input.txt",
        "[1,2]\n[[3,4],5]\n[6,[7]]\n",
    ));
    let service = service(fs);

    match service.load(Path::new("/hw/input.txt")) {
        Err(ApplicationError::Input { line, source }) => {
            assert_eq!(line, 3);
            assert!(matches!(source, DomainError::MalformedLiteral { .. }));
        }
        other => panic!("expected input error, got {:?}", other),
    }
}

#[test]
fn given_two_numbers_when_searching_largest_then_both_orders_are_considered() {
    let fs = Arc::new(MockFileSystem::with_file("/hw/pair.txt", "[4,5]\n[[1,2],3]\n"));
    let service = service(fs);
    let literals = service.load(Path::new("/hw/pair.txt")).unwrap();

    // [4,5] + [[1,2],3] = 120, [[1,2],3] + [4,5] = 125
    let report = service.largest_pair(&literals).unwrap();
    assert_eq!(report.magnitude, 125);
    assert_eq!((report.left, report.right), (1, 0));
}

#[test]
fn given_single_number_when_solving_then_not_enough_numbers() {
    let fs = Arc::new(MockFileSystem::with_file("/hw/one.txt", "[1,2]\n"));
    let service = service(fs);
    let literals = service.load(Path::new("/hw/one.txt")).unwrap();

    assert!(matches!(
        service.solve(&literals),
        Err(ApplicationError::NotEnoughNumbers { found: 1 })
    ));
}

#[test]
fn given_empty_file_when_summing_then_no_numbers() {
    let fs = Arc::new(MockFileSystem::with_file("/hw/empty.txt", "\n\n"));
    let service = service(fs);
    let literals = service.load(Path::new("/hw/empty.txt")).unwrap();

    assert!(literals.is_empty());
    assert!(matches!(
        service.final_sum(&literals),
        Err(ApplicationError::NoNumbers)
    ));
}
