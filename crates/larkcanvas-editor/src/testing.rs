//! Shared test support for the editor crate.

use kurbo::Size;
use larkcanvas_core::api::BoxFuture;
use larkcanvas_core::feedback::NullFeedback;
use larkcanvas_core::loader::{ImageLoadError, ImageLoader, ImageResource};
use larkcanvas_core::scene::{ContainerHandle, StageSurface};
use larkcanvas_core::stage::{Stage, StageConfig};
use std::rc::Rc;

/// Simple blocking executor for driving non-Send futures in tests.
pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}

/// Image loader that "loads" any locator without touching the network.
pub struct StubLoader;

impl ImageLoader for StubLoader {
    fn load(&self, src: &str) -> BoxFuture<'_, Result<ImageResource, ImageLoadError>> {
        let src = src.to_string();
        Box::pin(async move { Ok(ImageResource::from_src(src)) })
    }
}

/// Container handle reporting a fixed size.
pub struct FixedContainer(pub Size);

impl ContainerHandle for FixedContainer {
    fn client_size(&self) -> Size {
        self.0
    }
}

/// A stage attached to an 800x600 container, with stubbed collaborators.
pub fn attached_stage(config: StageConfig) -> Stage {
    let mut stage = Stage::new(config, Rc::new(StubLoader), Rc::new(NullFeedback));
    let container: Rc<dyn ContainerHandle> = Rc::new(FixedContainer(Size::new(800.0, 600.0)));
    stage.attach(Some(StageSurface::new(0.0, 0.0)), Some(container));
    stage
}
