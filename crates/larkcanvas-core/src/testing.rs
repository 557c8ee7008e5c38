//! Shared test support: a minimal blocking executor and fake collaborators.

use crate::api::{ApiError, ApiResult, BoxFuture, ProjectApi, UpdateProject};
use crate::feedback::NullFeedback;
use crate::loader::{ImageLoadError, ImageLoader, ImageResource};
use crate::scene::{ContainerHandle, StageSurface};
use crate::stage::{Stage, StageConfig};
use kurbo::Size;
use std::cell::RefCell;
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

/// Image loader that fails every load.
pub struct FailingLoader;

impl ImageLoader for FailingLoader {
    fn load(&self, src: &str) -> BoxFuture<'_, Result<ImageResource, ImageLoadError>> {
        let src = src.to_string();
        Box::pin(async move { Err(ImageLoadError::Unsupported(src)) })
    }
}

/// Project API that records every update it receives.
#[derive(Default)]
pub struct RecordingApi {
    pub updates: RefCell<Vec<UpdateProject>>,
    /// When true, `update` rejects instead of recording.
    pub fail: std::cell::Cell<bool>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_count(&self) -> usize {
        self.updates.borrow().len()
    }
}

impl ProjectApi for RecordingApi {
    fn update(&self, request: UpdateProject) -> BoxFuture<'_, ApiResult<()>> {
        Box::pin(async move {
            if self.fail.get() {
                return Err(ApiError::Request("simulated failure".to_string()));
            }
            self.updates.borrow_mut().push(request);
            Ok(())
        })
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
