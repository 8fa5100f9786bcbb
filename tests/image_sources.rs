mod common;

use std::fs;
use std::sync::Arc;

use common::{NoListing, StaticLibrary};
use fanart_screensaver::config::SourceKind;
use fanart_screensaver::source::{FsListing, ImageLocator, ImageSource};
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn folder_source_keeps_jpg_and_png_in_listing_order() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join("a.jpg"), b"x").unwrap();
    fs::write(root.join("b.png"), b"x").unwrap();
    fs::write(root.join("c.txt"), b"x").unwrap();
    fs::write(root.join("D.JPG"), b"x").unwrap();
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::write(root.join("nested").join("e.jpg"), b"x").unwrap();

    let source = ImageSource::new(
        SourceKind::ImageFolder,
        Some(root.to_path_buf()),
        Arc::new(StaticLibrary::default()),
        Arc::new(FsListing),
    );
    let images = source.fetch();

    let expected: Vec<ImageLocator> = ["D.JPG", "a.jpg", "b.png"]
        .iter()
        .map(|name| ImageLocator::new(root.join(name).to_string_lossy().into_owned()))
        .collect();
    assert_eq!(images, expected);
}

#[cfg(unix)]
#[test]
fn dangling_symlink_does_not_hide_other_images() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join("a.jpg"), b"x").unwrap();
    fs::write(root.join("c.png"), b"x").unwrap();
    std::os::unix::fs::symlink(root.join("gone.jpg"), root.join("b.jpg")).unwrap();

    let source = ImageSource::new(
        SourceKind::ImageFolder,
        Some(root.to_path_buf()),
        Arc::new(StaticLibrary::default()),
        Arc::new(FsListing),
    );
    let images = source.fetch();

    let expected: Vec<ImageLocator> = ["a.jpg", "c.png"]
        .iter()
        .map(|name| ImageLocator::new(root.join(name).to_string_lossy().into_owned()))
        .collect();
    assert_eq!(images, expected);
}

#[test]
fn missing_folder_yields_empty_list() {
    let tmp = tempdir().unwrap();
    let source = ImageSource::new(
        SourceKind::ImageFolder,
        Some(tmp.path().join("does-not-exist")),
        Arc::new(StaticLibrary::default()),
        Arc::new(FsListing),
    );
    assert!(source.fetch().is_empty());
}

#[test]
fn folder_source_without_path_yields_empty_list() {
    let source = ImageSource::new(
        SourceKind::ImageFolder,
        None,
        Arc::new(StaticLibrary::default()),
        Arc::new(NoListing),
    );
    assert!(source.fetch().is_empty());
}

#[test]
fn fanart_sources_query_their_library_method() {
    let cases = [
        (SourceKind::MovieFanart, "VideoLibrary.GetMovies"),
        (SourceKind::ArtistFanart, "AudioLibrary.GetArtists"),
        (SourceKind::AlbumFanart, "AudioLibrary.GetAlbums"),
    ];
    for (kind, method) in cases {
        let library = Arc::new(StaticLibrary::with_images(3));
        let source = ImageSource::new(kind, None, library.clone(), Arc::new(NoListing));
        let images = source.fetch();
        assert_eq!(images.len(), 3, "{kind}");
        assert_eq!(images[0].as_str(), "image://fanart-0.jpg/");

        let requests = library.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request: Value = serde_json::from_str(&requests[0]).unwrap();
        assert_eq!(request["method"], method);
        assert_eq!(request["params"]["properties"][0], "fanart");
    }
}

#[test]
fn failing_library_yields_empty_list() {
    let library = Arc::new(StaticLibrary {
        fail: true,
        ..StaticLibrary::with_images(4)
    });
    let source = ImageSource::new(SourceKind::MovieFanart, None, library, Arc::new(NoListing));
    assert!(source.fetch().is_empty());
}
